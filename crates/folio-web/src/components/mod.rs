mod about;
mod contact;
mod footer;
mod hero;
mod loading;
mod nav;
mod projects;

pub use about::About;
pub use contact::Contact;
pub use footer::Footer;
pub use hero::Hero;
pub use loading::LoadingScreen;
pub use nav::Navigation;
pub use projects::Projects;
