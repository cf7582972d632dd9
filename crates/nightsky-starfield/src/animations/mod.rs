pub mod nebula;
pub mod shooting;
pub mod twinkle;
