mod test_panel_basic;
mod test_surface_basic;
