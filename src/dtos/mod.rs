pub mod jobdtos;
pub mod messagedtos;
pub mod proposaldtos;
pub mod reviewdtos;
pub mod userdtos;
