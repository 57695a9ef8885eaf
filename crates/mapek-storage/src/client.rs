use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;

/// S3 client from the default credential chain. `region` overrides the
/// region the chain would otherwise resolve.
pub async fn s3_client(region: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_owned()));
    }
    Client::new(&loader.load().await)
}
