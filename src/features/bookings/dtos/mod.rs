mod booking_dto;

pub use booking_dto::{
    BookingDetailDto, BookingGuideDto, BookingTouristDto, BookingTripDto, CreateBookingRequestDto,
    UpdateBookingRequestDto,
};
