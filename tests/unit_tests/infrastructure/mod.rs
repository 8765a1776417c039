mod mock_adapters_test;
