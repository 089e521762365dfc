pub mod marks;
pub mod student;
pub mod teacher;

pub use marks::Entity as Marks;
pub use student::Entity as Student;
pub use teacher::Entity as Teacher;
