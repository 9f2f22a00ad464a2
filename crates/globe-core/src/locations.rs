//! Static registry of study-abroad destinations shown on the globe.

/// One point of interest on the globe. Created once at startup; never mutated.
#[derive(Clone, Copy, Debug)]
pub struct Location {
    pub lat: f32,
    pub lon: f32,
    /// Display color as 0xRRGGBB.
    pub color: u32,
    pub name: &'static str,
    pub programs: &'static [&'static str],
    pub description: &'static str,
}

pub const STUDY_DESTINATIONS: &[Location] = &[
    Location {
        lat: 40.7128,
        lon: -74.0060,
        color: 0xff3838,
        name: "New York University",
        programs: &["Business", "Arts", "Technology"],
        description: "Experience the vibrant culture of NYC while studying at a top-ranked university.",
    },
    Location {
        lat: 51.5074,
        lon: -0.1278,
        color: 0x4ade80,
        name: "London School of Economics",
        programs: &["Economics", "Political Science", "Law"],
        description: "Prestigious institution in the heart of London offering world-class education.",
    },
    Location {
        lat: 35.6895,
        lon: 139.6917,
        color: 0x22d3ee,
        name: "Tokyo University",
        programs: &["Engineering", "Asian Studies", "Science"],
        description: "Japan's top university with cutting-edge research and rich cultural immersion.",
    },
    Location {
        lat: -33.8688,
        lon: 151.2093,
        color: 0xffa500,
        name: "University of Sydney",
        programs: &["Environmental Science", "Marine Biology", "Business"],
        description: "Study in one of the world's most livable cities with beautiful beaches and landscapes.",
    },
    Location {
        lat: 19.0760,
        lon: 72.8777,
        color: 0xff5e82,
        name: "IIT Mumbai",
        programs: &["Technology", "Engineering", "Computer Science"],
        description: "India's premier technology institute with excellent research opportunities.",
    },
    Location {
        lat: 48.8566,
        lon: 2.3522,
        color: 0xc084fc,
        name: "Sorbonne University",
        programs: &["Arts", "Humanities", "French Language"],
        description: "Historic Parisian university offering exceptional programs in arts and humanities.",
    },
    Location {
        lat: 55.7558,
        lon: 37.6173,
        color: 0x60a5fa,
        name: "Moscow State University",
        programs: &["Russian Studies", "Physics", "Mathematics"],
        description: "Prestigious university with strong programs in sciences and Russian culture.",
    },
    Location {
        lat: -34.6037,
        lon: -58.3816,
        color: 0xfcd34d,
        name: "University of Buenos Aires",
        programs: &["Latin American Studies", "Agriculture", "Economics"],
        description: "Experience vibrant South American culture while studying at Argentina's top university.",
    },
];
