pub mod accessibility_panel;
