mod province_dto;

pub use province_dto::{CreateProvinceRequestDto, ProvinceResponseDto, UpdateProvinceRequestDto};
