// Integration tests for aid-metrics

mod integration {
    mod fixtures;

    mod cli_test;
    mod discovery_test;
    mod end_to_end_test;
    mod loader_test;
    mod output_test;
}
