pub mod clock;
pub mod verify_signature;
