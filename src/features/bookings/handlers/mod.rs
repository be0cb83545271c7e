mod booking_handler;

pub use booking_handler::{
    __path_create_booking, __path_delete_booking, __path_get_booking, __path_list_bookings,
    __path_my_bookings, __path_update_booking, create_booking, delete_booking, get_booking,
    list_bookings, my_bookings, update_booking,
};
