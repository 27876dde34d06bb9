mod helpers;
mod router_test;
mod statistics_test;
