pub mod appearance;
pub mod code_button;
pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod register;
pub mod reset_password;
