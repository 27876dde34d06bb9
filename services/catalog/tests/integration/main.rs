mod class_test;
mod router_test;
