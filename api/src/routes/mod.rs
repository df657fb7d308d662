pub mod auth;
pub mod review_pr;
