mod home;
mod location;
mod manager;
