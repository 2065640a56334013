pub mod cloudinary_service;
pub mod country_service;
pub mod duplicate_check;
pub mod employee_service;
