//! Built-in place directory.
//!
//! Corrections are local mean time against the zone's standard meridian,
//! `round((longitude − meridian) × 4)` minutes.

use crate::places::Place;

pub(crate) const PLACES: &[Place] = &[
    Place {
        name: "Seoul",
        aliases: &["서울", "서울특별시", "seoul-si"],
        country: "KR",
        latitude: 37.5665,
        longitude: 126.9780,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -32,
    },
    Place {
        name: "Busan",
        aliases: &["부산", "부산광역시", "pusan"],
        country: "KR",
        latitude: 35.1796,
        longitude: 129.0756,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -24,
    },
    Place {
        name: "Incheon",
        aliases: &["인천", "인천광역시"],
        country: "KR",
        latitude: 37.4563,
        longitude: 126.7052,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -33,
    },
    Place {
        name: "Daegu",
        aliases: &["대구", "대구광역시", "taegu"],
        country: "KR",
        latitude: 35.8714,
        longitude: 128.6014,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -26,
    },
    Place {
        name: "Daejeon",
        aliases: &["대전", "대전광역시", "taejon"],
        country: "KR",
        latitude: 36.3504,
        longitude: 127.3845,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -30,
    },
    Place {
        name: "Gwangju",
        aliases: &["광주", "광주광역시", "kwangju"],
        country: "KR",
        latitude: 35.1595,
        longitude: 126.8526,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -33,
    },
    Place {
        name: "Ulsan",
        aliases: &["울산", "울산광역시"],
        country: "KR",
        latitude: 35.5384,
        longitude: 129.3114,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -23,
    },
    Place {
        name: "Sejong",
        aliases: &["세종", "세종특별자치시"],
        country: "KR",
        latitude: 36.4800,
        longitude: 127.2890,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -31,
    },
    Place {
        name: "Suwon",
        aliases: &["수원", "수원시"],
        country: "KR",
        latitude: 37.2636,
        longitude: 127.0286,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -32,
    },
    Place {
        name: "Chuncheon",
        aliases: &["춘천", "춘천시"],
        country: "KR",
        latitude: 37.8813,
        longitude: 127.7298,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -29,
    },
    Place {
        name: "Gangneung",
        aliases: &["강릉", "강릉시"],
        country: "KR",
        latitude: 37.7519,
        longitude: 128.8761,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -24,
    },
    Place {
        name: "Cheongju",
        aliases: &["청주", "청주시"],
        country: "KR",
        latitude: 36.6424,
        longitude: 127.4890,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -30,
    },
    Place {
        name: "Jeonju",
        aliases: &["전주", "전주시"],
        country: "KR",
        latitude: 35.8242,
        longitude: 127.1480,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -31,
    },
    Place {
        name: "Pohang",
        aliases: &["포항", "포항시"],
        country: "KR",
        latitude: 36.0190,
        longitude: 129.3435,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -23,
    },
    Place {
        name: "Changwon",
        aliases: &["창원", "창원시"],
        country: "KR",
        latitude: 35.2280,
        longitude: 128.6811,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -25,
    },
    Place {
        name: "Mokpo",
        aliases: &["목포", "목포시"],
        country: "KR",
        latitude: 34.8118,
        longitude: 126.3922,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -34,
    },
    Place {
        name: "Jeju",
        aliases: &["제주", "제주시", "제주도"],
        country: "KR",
        latitude: 33.4996,
        longitude: 126.5312,
        timezone: "Asia/Seoul",
        standard_meridian: 135.0,
        correction_minutes: -34,
    },
    Place {
        name: "Tokyo",
        aliases: &["도쿄", "東京"],
        country: "JP",
        latitude: 35.6762,
        longitude: 139.6503,
        timezone: "Asia/Tokyo",
        standard_meridian: 135.0,
        correction_minutes: 19,
    },
    Place {
        name: "Osaka",
        aliases: &["오사카", "大阪"],
        country: "JP",
        latitude: 34.6937,
        longitude: 135.5023,
        timezone: "Asia/Tokyo",
        standard_meridian: 135.0,
        correction_minutes: 2,
    },
    Place {
        name: "Beijing",
        aliases: &["베이징", "북경", "北京"],
        country: "CN",
        latitude: 39.9042,
        longitude: 116.4074,
        timezone: "Asia/Shanghai",
        standard_meridian: 120.0,
        correction_minutes: -14,
    },
    Place {
        name: "Shanghai",
        aliases: &["상하이", "上海"],
        country: "CN",
        latitude: 31.2304,
        longitude: 121.4737,
        timezone: "Asia/Shanghai",
        standard_meridian: 120.0,
        correction_minutes: 6,
    },
    Place {
        name: "Hong Kong",
        aliases: &["홍콩", "香港"],
        country: "HK",
        latitude: 22.3193,
        longitude: 114.1694,
        timezone: "Asia/Hong_Kong",
        standard_meridian: 120.0,
        correction_minutes: -23,
    },
    Place {
        name: "Taipei",
        aliases: &["타이베이", "臺北"],
        country: "TW",
        latitude: 25.0330,
        longitude: 121.5654,
        timezone: "Asia/Taipei",
        standard_meridian: 120.0,
        correction_minutes: 6,
    },
    Place {
        name: "Singapore",
        aliases: &["싱가포르"],
        country: "SG",
        latitude: 1.3521,
        longitude: 103.8198,
        timezone: "Asia/Singapore",
        standard_meridian: 120.0,
        correction_minutes: -65,
    },
    Place {
        name: "Sydney",
        aliases: &["시드니"],
        country: "AU",
        latitude: -33.8688,
        longitude: 151.2093,
        timezone: "Australia/Sydney",
        standard_meridian: 150.0,
        correction_minutes: 5,
    },
    Place {
        name: "London",
        aliases: &["런던"],
        country: "GB",
        latitude: 51.5074,
        longitude: -0.1278,
        timezone: "Europe/London",
        standard_meridian: 0.0,
        correction_minutes: -1,
    },
    Place {
        name: "Paris",
        aliases: &["파리"],
        country: "FR",
        latitude: 48.8566,
        longitude: 2.3522,
        timezone: "Europe/Paris",
        standard_meridian: 15.0,
        correction_minutes: -51,
    },
    Place {
        name: "New York",
        aliases: &["뉴욕", "nyc"],
        country: "US",
        latitude: 40.7128,
        longitude: -74.0060,
        timezone: "America/New_York",
        standard_meridian: -75.0,
        correction_minutes: 4,
    },
    Place {
        name: "Los Angeles",
        aliases: &["로스앤젤레스", "la"],
        country: "US",
        latitude: 34.0522,
        longitude: -118.2437,
        timezone: "America/Los_Angeles",
        standard_meridian: -120.0,
        correction_minutes: 7,
    },
];
