pub mod extractor;
pub mod jwt;
pub mod password;
pub mod upload;

pub mod test_utils;
