pub mod github_callback_route;
pub mod github_login_route;
