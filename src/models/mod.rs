pub mod jobmodel;
pub mod messagemodel;
pub mod proposalmodel;
pub mod reviewmodel;
pub mod usermodel;
