mod factory_tests;
