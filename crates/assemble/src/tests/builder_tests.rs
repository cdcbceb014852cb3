use super::helpers::*;
use crate::locations::NO_INDEX;
use crate::{encode_coordinate, encode_timestamp, NewsFile, HEADER_BYTES};
use feed::Topic;

#[test]
fn headlines_take_input_order_and_cap_at_eleven() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = (0..13)
        .map(|i| article(&format!("story {}", i), Topic::National))
        .collect();

    file.build_headlines();

    assert_eq!(file.headlines.len(), 11);
    assert_eq!(file.header.number_of_headlines, 11);
    assert_eq!(file.header.headlines_table_offset, HEADER_BYTES);

    // First text entry sits right behind the full record table.
    assert_eq!(file.headlines[0].offset, HEADER_BYTES + 11 * 8);
    assert_eq!(file.headlines[0].size, "story 0".len() as u32 * 2);
}

#[test]
fn fewer_articles_than_ticker_slots() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![article("only one", Topic::Sports)];

    file.build_headlines();

    assert_eq!(file.headlines.len(), 1);
    assert_eq!(file.header.number_of_headlines, 1);
}

#[test]
fn article_ids_are_dense_and_one_based() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![
        article("a", Topic::National),
        article("b", Topic::Sports),
        article("c", Topic::Sports),
    ];

    file.build_headlines();
    file.build_article_table(&ctx(0));

    let ids: Vec<u32> = file.articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn article_without_location_gets_sentinel() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![article("nowhere", Topic::National)];

    file.build_article_table(&ctx(0));

    assert_eq!(file.articles[0].location_index, NO_INDEX);
    assert_eq!(file.articles[0].picture_index, NO_INDEX);
}

#[test]
fn nearby_coordinates_share_a_location() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![
        located("a", Topic::National, 48.8566, 2.3522, "Paris"),
        located("b", Topic::Sports, 48.8566 + 5e-10, 2.3522 - 5e-10, "Paris"),
    ];

    file.build_article_table(&ctx(0));

    assert_eq!(file.articles[0].location_index, 0);
    assert_eq!(file.articles[1].location_index, 0);
    assert_eq!(file.known_locations.len(), 1);
}

#[test]
fn distant_coordinates_get_distinct_locations() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![
        located("a", Topic::National, 48.8566, 2.3522, "Paris"),
        located("b", Topic::National, 48.8566 + 1e-5, 2.3522, "Paris North"),
    ];

    file.build_article_table(&ctx(0));

    assert_eq!(file.articles[0].location_index, 0);
    assert_eq!(file.articles[1].location_index, 1);
}

#[test]
fn zero_coordinates_are_never_registered() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![located("a", Topic::National, 0.0, 0.0, "Null Island")];

    file.build_article_table(&ctx(0));
    file.build_location_table();

    assert_eq!(file.articles[0].location_index, NO_INDEX);
    assert!(file.locations.is_empty());
    assert_eq!(file.header.number_of_locations, 0);
}

#[test]
fn missing_body_encodes_as_empty_text() {
    let mut file = NewsFile::new(&ctx(0));
    let mut a = article("headline only", Topic::National);
    a.content = None;
    file.input = vec![a];

    file.build_article_table(&ctx(0));

    assert_eq!(file.articles[0].body_size, 0);
    // offset was still recorded, after the title's entry
    assert!(file.articles[0].body_offset > file.articles[0].headline_offset);
    assert_eq!(file.current_len() % 4, 0);
}

#[test]
fn both_article_timestamps_use_the_run_clock() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![article("a", Topic::National)];

    file.build_article_table(&ctx(0));

    let expected = encode_timestamp(TEST_NOW);
    assert_eq!(file.articles[0].published_time, expected);
    assert_eq!(file.articles[0].updated_time, expected);
}

#[test]
fn topic_bucket_zero_stays_reserved() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![article("a", Topic::National)];

    file.build_headlines();
    file.build_article_table(&ctx(0));
    file.build_topic_table(&ctx(0));

    assert_eq!(file.topics.len(), 8);
    assert_eq!(file.topics[0], crate::TopicRecord::default());
    assert_eq!(file.header.number_of_topics, 8);
}

#[test]
fn fresh_articles_land_in_their_topic_bucket() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![
        article("a", Topic::Sports),
        article("b", Topic::Sports),
        article("c", Topic::Business),
    ];

    file.build_headlines();
    file.build_article_table(&ctx(0));
    file.build_topic_table(&ctx(0));

    // Sports is wire value 2, bucket 3; Business is 4, bucket 5.
    assert_eq!(file.topics[3].article_count, 2);
    assert_eq!(file.topics[5].article_count, 1);
    assert_eq!(file.topics[1].article_count, 0);
    assert_eq!(file.timestamps.len(), 3);
}

#[test]
fn empty_buckets_still_get_names() {
    let mut file = NewsFile::new(&ctx(0));

    file.build_topic_table(&ctx(0));

    for i in 1..8 {
        assert_ne!(file.topics[i].text_offset, 0, "bucket {} has no name", i);
        assert_eq!(file.topics[i].article_count, 0);
    }
}

#[test]
fn coordinate_encoding_truncates() {
    assert_eq!(encode_coordinate(0.0), 0);
    // one unit is exactly 360/65536 degrees
    assert_eq!(encode_coordinate(0.0054931640625), 1);
    assert_eq!(encode_coordinate(-0.0054931640625), -1);
    // just under one unit truncates to zero
    assert_eq!(encode_coordinate(0.0054), 0);
    assert_eq!(encode_coordinate(-0.0054), 0);
}

#[test]
fn coordinate_round_trip_over_representable_range() {
    const UNIT: f64 = 0.0054931640625;

    for degrees in [-85.0, -45.5, -0.01, 0.02, 13.37, 51.4778, 85.0, 179.9] {
        let stored = encode_coordinate(degrees);

        // decoding recovers the original to within one fixed-point unit
        let decoded = f64::from(stored) * UNIT;
        assert!(
            (decoded - degrees).abs() < UNIT,
            "{} decoded to {}",
            degrees,
            decoded
        );

        // and encoding the decoded value is a fixed point
        assert_eq!(encode_coordinate(decoded), stored);
    }
}

#[test]
fn image_records_only_for_non_empty_thumbnails() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![
        with_thumbnail(article("pictured", Topic::National), &[9, 9, 9], "a caption"),
        article("plain", Topic::National),
        with_thumbnail(article("empty image", Topic::National), &[], "ignored"),
    ];

    file.build_headlines();
    file.build_article_table(&ctx(0));
    file.build_images(&ctx(0));

    assert_eq!(file.images.len(), 1);
    assert_eq!(file.header.number_of_images, 1);
    assert_eq!(file.articles[0].picture_index, 0);
    assert_eq!(file.articles[0].picture_timestamp, encode_timestamp(TEST_NOW));
    assert_eq!(file.articles[1].picture_index, NO_INDEX);
    assert_eq!(file.articles[2].picture_index, NO_INDEX);
}

#[test]
fn captionless_image_keeps_zero_caption_fields() {
    let mut file = NewsFile::new(&ctx(0));
    file.input = vec![
        with_thumbnail(article("no caption", Topic::National), &[1, 2, 3, 4], ""),
        with_thumbnail(article("with caption", Topic::National), &[5, 6], "described"),
    ];

    file.build_headlines();
    file.build_article_table(&ctx(0));
    file.build_images(&ctx(0));

    assert_eq!(file.images[0].caption_size, 0);
    assert_eq!(file.images[0].caption_offset, 0);
    assert_eq!(file.images[1].caption_size, "described".len() as u32 * 2);
    assert_ne!(file.images[1].caption_offset, 0);
}
