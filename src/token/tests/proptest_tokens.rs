use proptest::prelude::*;

use crate::token::{QueryParams, TokenSigner};

fn params_from(pairs: &[(String, String)]) -> QueryParams {
    let mut query = QueryParams::new();
    for (key, value) in pairs {
        query.insert(key.clone(), value);
    }
    query
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn token_is_deterministic(
        secret in "[a-zA-Z0-9]{1,64}",
        timestamp in 0u64..=4_102_444_800,
        path in "/[a-z0-9/]{0,40}",
        pairs in proptest::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9]{0,12}"), 0..6),
    ) {
        let signer = TokenSigner::new("key", &secret);
        let query = params_from(&pairs);

        let a = signer.generate_token_at(timestamp, &path, &query, None);
        let b = signer.generate_token_at(timestamp, &path, &query, None);

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.timestamp, timestamp);
        prop_assert_eq!(a.digest.len(), 64);
        prop_assert!(a.digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn insertion_order_never_matters(
        secret in "[a-zA-Z0-9]{1,64}",
        timestamp in 0u64..=4_102_444_800,
        path in "/[a-z0-9/]{0,40}",
        map in proptest::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9]{0,12}", 2..6),
    ) {
        let signer = TokenSigner::new("key", &secret);

        let mut pairs: Vec<(String, String)> = map.into_iter().collect();
        let forward = params_from(&pairs);
        pairs.reverse();
        let reverse = params_from(&pairs);

        let a = signer.generate_token_at(timestamp, &path, &forward, None);
        let b = signer.generate_token_at(timestamp, &path, &reverse, None);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn timestamp_always_perturbs_digest(
        secret in "[a-zA-Z0-9]{1,64}",
        timestamp in 0u64..=4_102_444_800,
        path in "/[a-z0-9/]{0,40}",
    ) {
        let signer = TokenSigner::new("key", &secret);
        let query = QueryParams::new();

        let a = signer.generate_token_at(timestamp, &path, &query, None);
        let b = signer.generate_token_at(timestamp + 1, &path, &query, None);
        prop_assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn distinct_payloads_yield_distinct_digests(
        secret in "[a-zA-Z0-9]{1,64}",
        timestamp in 0u64..=4_102_444_800,
        body in "\\{\"amount\":\"[0-9]{1,6}\\.[0-9]{2}\"\\}",
    ) {
        let signer = TokenSigner::new("key", &secret);
        let query = QueryParams::new();

        let absent = signer.generate_token_at(timestamp, "/a", &query, None);
        let present = signer.generate_token_at(timestamp, "/a", &query, Some(&body));
        prop_assert_ne!(absent.digest, present.digest);
    }
}
