//! Entity definitions for the Meridian platform
//!
//! This crate contains Sea-ORM entity definitions for the database models:
//! the marketing content tables (articles, stories, team members, comments),
//! the CRM tables (contacts, inquiries, consultations, messages,
//! appointments), and the user accounts that own them.

pub mod sea_orm_active_enums;

pub mod users;
pub use users::Entity as Users;
pub mod articles;
pub use articles::Entity as Articles;
pub mod stories;
pub use stories::Entity as Stories;
pub mod team_members;
pub use team_members::Entity as TeamMembers;
pub mod comments;
pub use comments::Entity as Comments;
pub mod contacts;
pub use contacts::Entity as Contacts;
pub mod inquiries;
pub use inquiries::Entity as Inquiries;
pub mod consultations;
pub use consultations::Entity as Consultations;
pub mod messages;
pub use messages::Entity as Messages;
pub mod appointments;
pub use appointments::Entity as Appointments;
