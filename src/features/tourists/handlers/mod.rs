pub mod tourist_handler;

pub use tourist_handler::{
    __path_create_tourist, __path_delete_tourist, __path_get_tourist, __path_list_tourists,
    __path_update_tourist, create_tourist, delete_tourist, get_tourist, list_tourists,
    update_tourist,
};
