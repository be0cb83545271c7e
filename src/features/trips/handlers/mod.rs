mod trip_handler;

pub use trip_handler::{
    __path_create_trip, __path_delete_trip, __path_get_trip, __path_list_trips,
    __path_search_trips, __path_top_trips, __path_update_trip, create_trip, delete_trip, get_trip,
    list_trips, search_trips, top_trips, update_trip,
};
