pub mod db;
pub mod jobdb;
pub mod messagedb;
pub mod proposaldb;
pub mod reviewdb;
pub mod userdb;
