mod pipeline_controller_test;
mod pipeline_error_test;
mod request_builder_test;
