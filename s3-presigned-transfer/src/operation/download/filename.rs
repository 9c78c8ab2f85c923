/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use chrono::{DateTime, Local};
use percent_encoding::percent_decode_str;

/// Shortest URL path segment accepted as a file name
const MIN_FILENAME_LEN: usize = 3;

/// Prefix of the name used when the URL does not provide a usable one
pub(crate) const GENERATED_FILENAME_PREFIX: &str = "downloaded-file-";

/// Derive a local file name from a presigned URL.
///
/// The last path segment before the query string is used. When it is empty, shorter than three
/// characters or not a plain file name, a name of the form `downloaded-file-YYYYMMDD-HHMMSS` is
/// generated from the current local time.
///
/// ```
/// use s3_presigned_transfer::operation::download::derive_filename;
///
/// let name = derive_filename("https://b.s3.amazonaws.com/a/b/report.pdf?X-Amz-Signature=abc");
/// assert_eq!("report.pdf", name);
/// ```
pub fn derive_filename(url: &str) -> String {
    derive_filename_at(url, Local::now())
}

pub(crate) fn derive_filename_at(url: &str, now: DateTime<Local>) -> String {
    match last_path_segment(url) {
        Some(name) => name,
        None => format!(
            "{GENERATED_FILENAME_PREFIX}{}",
            now.format("%Y%m%d-%H%M%S")
        ),
    }
}

fn last_path_segment(url: &str) -> Option<String> {
    let url = reqwest::Url::parse(url).ok()?;
    // dot segments are already resolved by the parser
    let segment = url.path_segments()?.next_back()?;
    let name = percent_decode_str(segment).decode_utf8_lossy();

    let usable = name.chars().count() >= MIN_FILENAME_LEN
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    usable.then(|| name.into_owned())
}

#[cfg(test)]
mod tests {
    use super::{derive_filename, derive_filename_at, GENERATED_FILENAME_PREFIX};
    use chrono::{Local, TimeZone};

    fn is_generated_name(name: &str) -> bool {
        // downloaded-file-\d{8}-\d{6}
        let Some(stamp) = name.strip_prefix(GENERATED_FILENAME_PREFIX) else {
            return false;
        };
        let bytes = stamp.as_bytes();
        bytes.len() == 15
            && bytes[8] == b'-'
            && bytes[..8].iter().all(u8::is_ascii_digit)
            && bytes[9..].iter().all(u8::is_ascii_digit)
    }

    #[test]
    fn test_name_from_path_segment() {
        assert_eq!(
            "report.pdf",
            derive_filename("https://b.s3.amazonaws.com/a/b/report.pdf?X-Amz-Sig=abc")
        );
        assert_eq!(
            "summary.csv",
            derive_filename("https://b.s3.us-west-2.amazonaws.com/data/summary.csv?X-Amz-Expires=60")
        );
        assert_eq!(
            "my report.pdf",
            derive_filename("https://b.s3.amazonaws.com/my%20report.pdf?sig=1")
        );
        assert_eq!("abc", derive_filename("https://host/abc#frag"));
    }

    #[test]
    fn test_query_never_contributes_to_name() {
        assert_eq!(
            "key.bin",
            derive_filename(
                "https://b.s3.amazonaws.com/key.bin?response-content-disposition=attachment%3B%20filename%3D%22x%2Fother.txt%22&note=a/b/c.txt"
            )
        );
        assert_eq!(
            "key.bin",
            derive_filename("https://b.s3.amazonaws.com/dir/key.bin?redirect=https://evil/x.sh")
        );
    }

    #[test]
    fn test_degenerate_names_are_replaced() {
        for url in [
            "https://b.s3.amazonaws.com/a/b/x?sig=abc",
            "https://b.s3.amazonaws.com/a/b/?sig=abc",
            "https://b.s3.amazonaws.com?sig=abc",
            "https://b.s3.amazonaws.com/..?sig=abc",
            "https://b.s3.amazonaws.com/a%2F..%2Fetc?sig=abc",
            "https://b.s3.amazonaws.com/a/%2e%2e?sig=abc",
            "not a url",
        ] {
            let name = derive_filename(url);
            assert!(is_generated_name(&name), "{url} -> {name}");
        }
    }

    #[test]
    fn test_generated_name_uses_timestamp() {
        let now = Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            "downloaded-file-20250307-090501",
            derive_filename_at("https://host/x?y=z", now)
        );
    }
}
