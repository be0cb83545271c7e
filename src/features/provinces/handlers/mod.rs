pub mod province_handler;

pub use province_handler::{
    __path_create_province, __path_delete_province, __path_get_province, __path_list_provinces,
    __path_update_province, create_province, delete_province, get_province, list_provinces,
    update_province,
};
