use proptest::prelude::*;
use slnsort_fs::SourceText;

proptest! {
    #[test]
    fn any_bytes_survive_decode_and_encode(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let source = SourceText::decode(&bytes);
        prop_assert_eq!(source.encode().unwrap(), bytes);
    }

    #[test]
    fn decoded_text_orders_like_bytes(a in proptest::collection::vec(any::<u8>(), 0..32),
                                      b in proptest::collection::vec(any::<u8>(), 0..32)) {
        let da = slnsort_fs::codec::decode_bytes(&a);
        let db = slnsort_fs::codec::decode_bytes(&b);
        prop_assert_eq!(da.cmp(&db), a.cmp(&b));
    }
}
