mod dashboard;
mod health_test;
