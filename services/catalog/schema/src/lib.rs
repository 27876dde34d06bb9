pub mod class_templates;
