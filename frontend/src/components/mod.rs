pub mod dashboard;
pub mod login;
pub mod scoreboard;
pub mod trip_form;
