pub mod dataset_dto;
pub mod form_dto;
pub mod health_dto;
pub mod outcome_dto;
pub mod ping_dto;
pub mod upload_dao;
