mod guide_dto;

pub use guide_dto::{
    CreateGuideForm, CreateGuideRequest, GuideDetailDto, GuideResponseDto, GuideTripDto,
    TopGuideDto, UpdateGuideForm, UpdateGuideRequest,
};
