mod helpers;
mod role_test;
mod router_test;
