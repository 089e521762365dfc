mod schema_test;
