pub mod marks;
pub mod student;
pub mod teacher;
