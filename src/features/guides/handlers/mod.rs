pub mod guide_handler;

pub use guide_handler::{
    __path_create_guide, __path_delete_guide, __path_get_guide, __path_list_guides,
    __path_search_guides, __path_top_guides, __path_update_guide, create_guide, delete_guide,
    get_guide, list_guides, search_guides, top_guides, update_guide,
};
