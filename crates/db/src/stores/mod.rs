pub mod firebase;
pub mod postgres;
