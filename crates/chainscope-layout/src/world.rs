#![forbid(unsafe_code)]

//! Coarse world landmass outline.
//!
//! Hand-reduced polylines in (longitude, latitude) degrees, closed where the
//! landmass is drawn as a loop. Resolution is matched to braille map sizes,
//! a few hundred segments in total, so the outline reads as continents
//! without drowning the hotspot markers.

/// Landmass outlines, one polyline per entry.
pub const WORLD_OUTLINE: &[&[(f64, f64)]] = &[
    // North America
    &[
        (-165.0, 60.0),
        (-158.0, 58.0),
        (-152.0, 59.0),
        (-145.0, 60.0),
        (-135.0, 57.0),
        (-130.0, 54.0),
        (-125.0, 49.0),
        (-124.0, 40.0),
        (-117.0, 33.0),
        (-110.0, 24.0),
        (-105.0, 20.0),
        (-97.0, 16.0),
        (-92.0, 15.0),
        (-85.0, 12.0),
        (-83.0, 9.0),
        (-80.0, 9.0),
        (-82.0, 14.0),
        (-87.0, 17.0),
        (-90.0, 21.0),
        (-84.0, 22.0),
        (-81.0, 25.0),
        (-80.0, 32.0),
        (-75.0, 35.0),
        (-70.0, 42.0),
        (-65.0, 45.0),
        (-60.0, 47.0),
        (-55.0, 52.0),
        (-60.0, 58.0),
        (-68.0, 60.0),
        (-78.0, 62.0),
        (-85.0, 66.0),
        (-95.0, 68.0),
        (-110.0, 68.0),
        (-125.0, 70.0),
        (-140.0, 70.0),
        (-156.0, 71.0),
        (-165.0, 66.0),
        (-165.0, 60.0),
    ],
    // South America
    &[
        (-80.0, 9.0),
        (-79.0, 1.0),
        (-81.0, -5.0),
        (-76.0, -14.0),
        (-70.0, -20.0),
        (-70.0, -30.0),
        (-72.0, -40.0),
        (-74.0, -50.0),
        (-68.0, -55.0),
        (-65.0, -55.0),
        (-62.0, -40.0),
        (-58.0, -34.0),
        (-48.0, -28.0),
        (-40.0, -22.0),
        (-35.0, -9.0),
        (-35.0, -5.0),
        (-44.0, -3.0),
        (-50.0, 0.0),
        (-52.0, 5.0),
        (-61.0, 9.0),
        (-64.0, 10.0),
        (-72.0, 12.0),
        (-77.0, 9.0),
        (-80.0, 9.0),
    ],
    // Greenland
    &[
        (-45.0, 60.0),
        (-52.0, 63.0),
        (-54.0, 67.0),
        (-52.0, 71.0),
        (-45.0, 75.0),
        (-35.0, 77.0),
        (-25.0, 76.0),
        (-20.0, 73.0),
        (-22.0, 70.0),
        (-30.0, 67.0),
        (-38.0, 62.0),
        (-45.0, 60.0),
    ],
    // Africa
    &[
        (-6.0, 35.0),
        (-10.0, 31.0),
        (-17.0, 21.0),
        (-17.0, 15.0),
        (-12.0, 8.0),
        (-8.0, 5.0),
        (-4.0, 5.0),
        (4.0, 6.0),
        (9.0, 4.0),
        (9.0, -1.0),
        (13.0, -6.0),
        (12.0, -12.0),
        (14.0, -22.0),
        (17.0, -29.0),
        (20.0, -34.0),
        (27.0, -33.0),
        (32.0, -28.0),
        (35.0, -22.0),
        (40.0, -15.0),
        (40.0, -10.0),
        (43.0, -1.0),
        (51.0, 10.0),
        (48.0, 11.0),
        (43.0, 11.0),
        (38.0, 18.0),
        (35.0, 28.0),
        (32.0, 31.0),
        (25.0, 32.0),
        (18.0, 30.0),
        (10.0, 33.0),
        (10.0, 37.0),
        (2.0, 37.0),
        (-6.0, 35.0),
    ],
    // Eurasia
    &[
        (-9.0, 43.0),
        (-6.0, 36.0),
        (-2.0, 36.0),
        (3.0, 42.0),
        (8.0, 44.0),
        (13.0, 40.0),
        (18.0, 40.0),
        (23.0, 36.0),
        (27.0, 36.0),
        (30.0, 36.0),
        (35.0, 34.0),
        (35.0, 30.0),
        (48.0, 29.0),
        (50.0, 27.0),
        (57.0, 25.0),
        (62.0, 25.0),
        (67.0, 24.0),
        (72.0, 20.0),
        (73.0, 15.0),
        (77.0, 8.0),
        (80.0, 13.0),
        (85.0, 20.0),
        (90.0, 22.0),
        (95.0, 16.0),
        (98.0, 8.0),
        (101.0, 3.0),
        (104.0, 2.0),
        (105.0, 10.0),
        (108.0, 12.0),
        (110.0, 20.0),
        (114.0, 22.0),
        (118.0, 25.0),
        (121.0, 30.0),
        (122.0, 35.0),
        (125.0, 39.0),
        (128.0, 35.0),
        (130.0, 43.0),
        (135.0, 45.0),
        (140.0, 50.0),
        (142.0, 54.0),
        (150.0, 60.0),
        (158.0, 62.0),
        (165.0, 65.0),
        (178.0, 66.0),
        (170.0, 70.0),
        (150.0, 72.0),
        (130.0, 73.0),
        (110.0, 74.0),
        (90.0, 75.0),
        (70.0, 73.0),
        (60.0, 69.0),
        (50.0, 69.0),
        (40.0, 67.0),
        (30.0, 70.0),
        (25.0, 71.0),
        (15.0, 69.0),
        (10.0, 64.0),
        (5.0, 62.0),
        (5.0, 58.0),
        (8.0, 54.0),
        (0.0, 50.0),
        (-2.0, 48.0),
        (-5.0, 48.0),
        (-2.0, 44.0),
        (-9.0, 43.0),
    ],
    // British Isles
    &[
        (-5.0, 50.0),
        (-3.0, 53.0),
        (-5.0, 56.0),
        (-3.0, 58.0),
        (-1.0, 57.0),
        (0.0, 53.0),
        (1.0, 51.0),
        (-5.0, 50.0),
    ],
    // Japan
    &[
        (130.0, 31.0),
        (132.0, 34.0),
        (136.0, 35.0),
        (140.0, 36.0),
        (141.0, 39.0),
        (142.0, 43.0),
        (145.0, 44.0),
        (143.0, 42.0),
        (140.0, 35.0),
        (135.0, 33.0),
        (130.0, 31.0),
    ],
    // Maritime Southeast Asia
    &[
        (95.0, 5.0),
        (100.0, 2.0),
        (104.0, -3.0),
        (106.0, -6.0),
        (114.0, -7.0),
        (120.0, -8.0),
        (125.0, -8.0),
    ],
    // New Guinea
    &[
        (131.0, -1.0),
        (138.0, -2.0),
        (145.0, -5.0),
        (150.0, -8.0),
        (147.0, -9.0),
        (140.0, -8.0),
        (134.0, -4.0),
        (131.0, -1.0),
    ],
    // Australia
    &[
        (114.0, -22.0),
        (114.0, -30.0),
        (116.0, -34.0),
        (124.0, -33.0),
        (130.0, -32.0),
        (136.0, -35.0),
        (140.0, -38.0),
        (147.0, -39.0),
        (150.0, -37.0),
        (153.0, -30.0),
        (153.0, -25.0),
        (146.0, -19.0),
        (142.0, -12.0),
        (136.0, -12.0),
        (132.0, -11.0),
        (125.0, -14.0),
        (122.0, -18.0),
        (114.0, -22.0),
    ],
    // Madagascar
    &[
        (44.0, -12.0),
        (48.0, -14.0),
        (50.0, -16.0),
        (47.0, -25.0),
        (44.0, -23.0),
        (44.0, -12.0),
    ],
];
