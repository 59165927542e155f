pub mod candidate_dto;
pub mod common_dto;
pub mod company_dto;
