pub mod doctor;
pub mod enhance;
pub mod init;
pub mod misc;
pub mod notes;
