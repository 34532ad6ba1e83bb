pub mod catalog_view;
pub mod context;
pub mod layout;
pub mod overlays;
pub mod results_view;
pub mod selection_view;
