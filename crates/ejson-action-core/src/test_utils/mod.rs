pub mod mock_release_server;
