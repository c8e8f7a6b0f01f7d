use chrono::NaiveDateTime;

/// Appointment details shared by the confirmation and cancellation mails.
#[derive(Debug, Clone)]
pub struct BookingEmail {
    pub doctor: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewBookingEmail {
    pub booking: BookingEmail,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct BillEmail {
    pub booking: BookingEmail,
    pub price: i64,
}

#[derive(Debug, Clone)]
pub struct ForgotPasswordEmail {
    pub name: String,
    pub new_password: String,
}

fn fmt_time(t: NaiveDateTime) -> String {
    t.format("%H:%M %d/%m/%Y").to_string()
}

fn fmt_slot(b: &BookingEmail) -> String {
    format!("{} - {}", fmt_time(b.start_time), fmt_time(b.end_time))
}

pub fn render_booking_new(data: &NewBookingEmail) -> String {
    format!(
        "<html><body>\
         <h2>DoctorCare - booking received</h2>\
         <p>Dear {name},</p>\
         <p>Your appointment with Dr. {doctor} has been received and is awaiting \
         confirmation.</p>\
         <p><b>Time:</b> {slot}</p>\
         <ul>\
         <li>Name: {name}</li>\
         <li>Phone: {phone}</li>\
         <li>Email: {email}</li>\
         <li>Address: {address}</li>\
         <li>Reason: {description}</li>\
         </ul>\
         <p>You will receive another email once a supporter confirms the booking.</p>\
         </body></html>",
        name = data.name,
        doctor = data.booking.doctor,
        slot = fmt_slot(&data.booking),
        phone = data.phone,
        email = data.email,
        address = data.address,
        description = data.description,
    )
}

pub fn render_booking_success(data: &BookingEmail) -> String {
    format!(
        "<html><body>\
         <h2>DoctorCare - booking confirmed</h2>\
         <p>Your appointment with Dr. {doctor} has been confirmed.</p>\
         <p><b>Time:</b> {slot}</p>\
         <p>Please arrive 15 minutes early.</p>\
         </body></html>",
        doctor = data.doctor,
        slot = fmt_slot(data),
    )
}

pub fn render_booking_failed(data: &BookingEmail) -> String {
    format!(
        "<html><body>\
         <h2>DoctorCare - booking cancelled</h2>\
         <p>Unfortunately your appointment with Dr. {doctor} could not be \
         confirmed.</p>\
         <p><b>Time:</b> {slot}</p>\
         <p>Please book another schedule at your convenience.</p>\
         </body></html>",
        doctor = data.doctor,
        slot = fmt_slot(data),
    )
}

pub fn render_bill(data: &BillEmail) -> String {
    format!(
        "<html><body>\
         <h2>DoctorCare - consultation bill</h2>\
         <p>Thank you for your visit with Dr. {doctor}.</p>\
         <p><b>Time:</b> {slot}</p>\
         <p><b>Amount due:</b> {price} VND</p>\
         </body></html>",
        doctor = data.booking.doctor,
        slot = fmt_slot(&data.booking),
        price = data.price,
    )
}

pub fn render_forgot_password(data: &ForgotPasswordEmail) -> String {
    format!(
        "<html><body>\
         <h2>DoctorCare - password reset</h2>\
         <p>Dear {name},</p>\
         <p>Your new password is: <b>{new_password}</b></p>\
         <p>Please change it after your next login.</p>\
         </body></html>",
        name = data.name,
        new_password = data.new_password,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking() -> BookingEmail {
        BookingEmail {
            doctor: "Nguyen Van A".to_string(),
            start_time: NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            end_time: NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn booking_success_mentions_doctor_and_slot() {
        let html = render_booking_success(&booking());
        assert!(html.contains("Nguyen Van A"));
        assert!(html.contains("08:00 10/03/2025"));
        assert!(html.contains("09:00 10/03/2025"));
        assert!(html.contains("confirmed"));
    }

    #[test]
    fn bill_shows_price() {
        let html = render_bill(&BillEmail {
            booking: booking(),
            price: 300_000,
        });
        assert!(html.contains("300000 VND"));
    }

    #[test]
    fn forgot_password_contains_new_password() {
        let html = render_forgot_password(&ForgotPasswordEmail {
            name: "Tester".to_string(),
            new_password: "a1B2c3D4".to_string(),
        });
        assert!(html.contains("a1B2c3D4"));
    }
}
