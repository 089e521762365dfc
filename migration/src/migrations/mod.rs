pub mod m202510010001_create_teachers;
pub mod m202510010002_create_students;
pub mod m202510010003_create_marks;
