use aws_sdk_polly::Client as PollyClient;

pub fn create_mock_polly_client() -> PollyClient {
    // No credentials and an endpoint nothing listens on: every call fails fast
    let config = aws_sdk_polly::Config::builder()
        .behavior_version(aws_sdk_polly::config::BehaviorVersion::latest())
        .region(aws_sdk_polly::config::Region::new("us-east-1"))
        .endpoint_url("http://localhost:9999")
        .build();

    PollyClient::from_conf(config)
}
