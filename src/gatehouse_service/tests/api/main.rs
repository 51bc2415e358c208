mod helpers;
mod lifecycle;
mod users;
