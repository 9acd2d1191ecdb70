//! The twelve zodiac constellations: reference data, sky labels and
//! navigation between them.

use std::fmt::{Display, Formatter};

use rust_i18n::t;

use crate::{
    coordinates::Equatorial,
    meteor::window::{ActiveWindow, MonthDay},
    projection::Projection,
};

/// Classical element of a sign.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Fire => write!(f, "{}", t!("zodiac.fire")),
            Element::Earth => write!(f, "{}", t!("zodiac.earth")),
            Element::Air => write!(f, "{}", t!("zodiac.air")),
            Element::Water => write!(f, "{}", t!("zodiac.water")),
        }
    }
}

/// A zodiac constellation.
#[derive(Clone, PartialEq, Debug)]
pub struct Constellation {
    pub name: &'static str,
    pub symbol: char,
    /// Dates the Sun spends in the sign.
    pub dates: ActiveWindow,
    pub element: Element,
    /// Ruling planet.
    pub ruler: &'static str,
    /// Months when the constellation is best placed in the evening sky.
    pub best_viewing: &'static str,
    pub main_stars: &'static str,
    pub story: &'static str,
    pub mythology: &'static str,
    /// Point near the brightest stars, used to centre the view.
    pub center: Equatorial,
}

const fn dates(start: (u32, u32), end: (u32, u32)) -> ActiveWindow {
    ActiveWindow::new(MonthDay::new(start.0, start.1), MonthDay::new(end.0, end.1))
}

/// The zodiac in order of the signs, starting at the March equinox.
pub static ZODIAC: [Constellation; 12] = [
    Constellation {
        name: "Aries",
        symbol: '♈',
        dates: dates((3, 21), (4, 19)),
        element: Element::Fire,
        ruler: "Mars",
        best_viewing: "November to December",
        main_stars: "Hamal (α Ari), Sheratan (β Ari), Mesarthim (γ Ari)",
        story: "The ram with the golden fleece. It rescued the prince Phrixus and the \
                princess Helle from their stepmother and carried them across the sea. \
                Helle fell into the water on the way, but Phrixus arrived safely and \
                offered the fleece to Zeus, who placed the ram among the stars.",
        mythology: "The golden fleece later sent Jason and the Argonauts on their quest, \
                    one of the great hero epics of Greek myth.",
        center: Equatorial::new(32.2, 20.8),
    },
    Constellation {
        name: "Taurus",
        symbol: '♉',
        dates: dates((4, 20), (5, 20)),
        element: Element::Earth,
        ruler: "Venus",
        best_viewing: "December to January",
        main_stars: "Aldebaran (α Tau), the 14th brightest star; the Pleiades (M45)",
        story: "Zeus fell for the Phoenician princess Europa and took the form of a \
                gentle white bull. When she climbed onto its back he carried her across \
                the sea to Crete, and later set the bull in the sky.",
        mythology: "The Pleiades hold a place in many cultures. Japan calls the cluster \
                    Subaru, and it is the finest cluster visible to the naked eye.",
        center: Equatorial::new(68.9, 16.5),
    },
    Constellation {
        name: "Gemini",
        symbol: '♊',
        dates: dates((5, 21), (6, 20)),
        element: Element::Air,
        ruler: "Mercury",
        best_viewing: "January to February",
        main_stars: "Castor (α Gem), Pollux (β Gem)",
        story: "The twins Castor and Pollux, sons of Leda. Castor was mortal and Pollux \
                a son of Zeus. When Castor fell in battle, Pollux asked to share his \
                immortality with him, and Zeus joined the brothers in the sky.",
        mythology: "The twins watched over sailors. St. Elmo's fire on a ship's mast was \
                    taken as a sign of their presence.",
        center: Equatorial::new(116.3, 28.0),
    },
    Constellation {
        name: "Cancer",
        symbol: '♋',
        dates: dates((6, 21), (7, 22)),
        element: Element::Water,
        ruler: "Moon",
        best_viewing: "February to March",
        main_stars: "Tarf (β Cnc), the Beehive Cluster (M44)",
        story: "While Heracles fought the Hydra, Hera sent a giant crab to bite his \
                feet. Heracles crushed it, and Hera raised it to the sky for its loyalty.",
        mythology: "The Beehive Cluster looks like a faint cloud to the eye but holds \
                    hundreds of stars. It is one of the open clusters nearest to Earth.",
        center: Equatorial::new(130.8, 19.5),
    },
    Constellation {
        name: "Leo",
        symbol: '♌',
        dates: dates((7, 23), (8, 22)),
        element: Element::Fire,
        ruler: "Sun",
        best_viewing: "March to April",
        main_stars: "Regulus (α Leo), the lion's heart; Denebola (β Leo), the lion's tail",
        story: "The Nemean lion, whose hide no weapon could pierce, was the first of the \
                twelve labours of Heracles. He strangled it with his bare hands and wore \
                its pelt as armour.",
        mythology: "Regulus, the 21st brightest star, has long been called the royal star.",
        center: Equatorial::new(152.1, 11.9),
    },
    Constellation {
        name: "Virgo",
        symbol: '♍',
        dates: dates((8, 23), (9, 22)),
        element: Element::Earth,
        ruler: "Mercury",
        best_viewing: "April to May",
        main_stars: "Spica (α Vir), the 16th brightest star",
        story: "Persephone, daughter of Demeter, or Astraea, goddess of justice. Astraea \
                was the last of the gods to leave the Earth, rising to the sky with the \
                scales of justice beside her.",
        mythology: "Spica means ear of wheat. The blue-white binary was used to mark the \
                    seasons for sowing and harvest.",
        center: Equatorial::new(201.3, -11.2),
    },
    Constellation {
        name: "Libra",
        symbol: '♎',
        dates: dates((9, 23), (10, 22)),
        element: Element::Air,
        ruler: "Venus",
        best_viewing: "May to June",
        main_stars: "Zubenelgenubi (α Lib), the southern claw; Zubeneschamali (β Lib), \
                     the northern claw",
        story: "The scales Astraea used to weigh the deeds of mankind. Libra is the only \
                zodiac constellation that is not a living creature.",
        mythology: "Its two brightest stars were once the claws of the Scorpion. \
                    Zubeneschamali is one of the few stars described as green.",
        center: Equatorial::new(229.3, -16.0),
    },
    Constellation {
        name: "Scorpius",
        symbol: '♏',
        dates: dates((10, 23), (11, 21)),
        element: Element::Water,
        ruler: "Pluto (Mars in antiquity)",
        best_viewing: "June to July",
        main_stars: "Antares (α Sco), a red supergiant",
        story: "Orion boasted he would kill every animal on Earth, so Gaia sent a \
                scorpion to sting him. Zeus placed both in the sky on opposite sides, so \
                Orion sets as the Scorpion rises.",
        mythology: "Antares, the rival of Mars, is about 700 times wider than the Sun and \
                    its red glow is often mistaken for the planet.",
        center: Equatorial::new(247.4, -26.3),
    },
    Constellation {
        name: "Sagittarius",
        symbol: '♐',
        dates: dates((11, 22), (12, 21)),
        element: Element::Fire,
        ruler: "Jupiter",
        best_viewing: "July to August",
        main_stars: "Kaus Australis (ε Sgr), Nunki (σ Sgr)",
        story: "The centaur Chiron, wisest of his kind and a master of medicine, music \
                and prophecy who taught many heroes. Wounded by a poisoned arrow, he gave \
                up his immortality and Zeus set him among the stars.",
        mythology: "The archer points towards the centre of the Milky Way, a region rich \
                    in nebulae such as the Lagoon (M8) and the Trifid (M20).",
        center: Equatorial::new(283.8, -25.4),
    },
    Constellation {
        name: "Capricornus",
        symbol: '♑',
        dates: dates((12, 22), (1, 19)),
        element: Element::Earth,
        ruler: "Saturn",
        best_viewing: "August to September",
        main_stars: "Deneb Algedi (δ Cap), the goat's tail",
        story: "The god Pan leapt into the Nile to escape the monster Typhon. In his \
                panic only his lower half became a fish, and Zeus found the shape amusing \
                enough to put in the sky.",
        mythology: "The Babylonians knew it as the goat-fish, linked to Enki, god of \
                    wisdom and water.",
        center: Equatorial::new(308.3, -17.2),
    },
    Constellation {
        name: "Aquarius",
        symbol: '♒',
        dates: dates((1, 20), (2, 18)),
        element: Element::Air,
        ruler: "Uranus (Saturn in antiquity)",
        best_viewing: "September to October",
        main_stars: "Sadalmelik (α Aqr), Sadalsuud (β Aqr)",
        story: "Ganymede, the Trojan prince whose beauty caught the eye of Zeus. Zeus \
                took the form of an eagle and carried him to Olympus to serve as \
                cupbearer to the gods.",
        mythology: "The water he pours flows into Piscis Austrinus. The region is known \
                    as the Sea, shared with Pisces, Cetus and other watery figures.",
        center: Equatorial::new(331.4, -9.9),
    },
    Constellation {
        name: "Pisces",
        symbol: '♓',
        dates: dates((2, 19), (3, 20)),
        element: Element::Water,
        ruler: "Neptune (Jupiter in antiquity)",
        best_viewing: "October to November",
        main_stars: "Alpherg (η Psc), γ Psc",
        story: "Aphrodite and her son Eros leapt into the Euphrates as fish to escape \
                Typhon. They tied their tails together with a ribbon so they would not \
                be parted.",
        mythology: "The March equinox once lay in Pisces and has since drifted towards \
                    Aquarius through precession.",
        center: Equatorial::new(23.7, 3.8),
    },
];

impl Constellation {
    fn index(&self) -> Option<usize> {
        ZODIAC.iter().position(|c| c.name == self.name)
    }

    /// Returns the sign after this one, wrapping from Pisces to Aries.
    pub fn next(&self) -> &'static Constellation {
        let index = self.index().map_or(0, |i| (i + 1) % ZODIAC.len());
        &ZODIAC[index]
    }

    /// Returns the sign before this one, wrapping from Aries to Pisces.
    pub fn previous(&self) -> &'static Constellation {
        let index = self
            .index()
            .map_or(ZODIAC.len() - 1, |i| (i + ZODIAC.len() - 1) % ZODIAC.len());
        &ZODIAC[index]
    }
}

/// A constellation name placed on the sky chart.
#[derive(Clone, PartialEq, Debug)]
pub struct ConstellationLabel {
    pub constellation: &'static Constellation,
    /// Screen position of the constellation centre, in pixels.
    pub x: f64,
    pub y: f64,
}

impl ConstellationLabel {
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Places every zodiac constellation whose centre is visible.
pub fn project_constellations(projection: &impl Projection) -> Vec<ConstellationLabel> {
    ZODIAC
        .iter()
        .filter_map(|constellation| {
            let (x, y) = projection.project(&constellation.center);
            if x.is_nan() || y.is_nan() {
                return None;
            }
            Some(ConstellationLabel { constellation, x, y })
        })
        .collect()
}

/// Returns the label closest to the given point within `tolerance` pixels.
pub fn label_at(
    labels: &[ConstellationLabel],
    x: f64,
    y: f64,
    tolerance: f64,
) -> Option<&ConstellationLabel> {
    labels
        .iter()
        .map(|label| (label, label.distance_to(x, y)))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(label, _)| label)
}
