pub mod candidate;
pub mod company;
pub mod interview;
pub mod pagination;
pub mod recruiter;
