pub mod folders;
pub mod groups;
pub mod ls;
pub mod tags;
