pub mod employment;
pub mod home;
pub mod system;
