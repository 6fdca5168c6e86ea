use super::{Statistics, StatsError};
use crate::classifier::HoleHandClass;
use crate::evaluator::{HandType, SortCode};
use crate::game::Street;
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Number of side-by-side columns in the hole-card reports.
pub const REPORT_COLUMNS: usize = 10;

const WIN_RANK_FILE: &str = "hole-cards-win-rank.csv";
const WIN_PCT_FILE: &str = "hole-cards-vs-other-hole-cards-win-pct.csv";

/// Winning hand types on one street.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandTypeDistribution {
    pub counts: [u64; HandType::COUNT],
    /// Configured deals; the denominator for percentages.
    pub iterations: u64,
    /// First code whose cumulative win count reaches half the configured deals.
    pub median: Option<SortCode>,
}

impl HandTypeDistribution {
    pub fn percentage(&self, hand_type: HandType) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        100.0 * self.counts[hand_type.ordinal() as usize] as f64 / self.iterations as f64
    }

    /// Median as printed in reports: its ranks, with `s` for suited types.
    pub fn median_label(&self) -> String {
        match self.median {
            Some(code) => {
                let hand = code.decode();
                let suffix = if hand.hand_type().is_suited() { "s" } else { "" };
                format!("{}{suffix}", hand.rank_string())
            }
            None => String::new(),
        }
    }
}

impl Statistics {
    /// For each class, how many other classes it beats head to head on
    /// `street`, sorted by that count (highest first).
    pub fn head_to_head_wins(&self, street: Street) -> Vec<(HoleHandClass, usize)> {
        let n = self.index.len();
        let mut wins: Vec<(HoleHandClass, usize)> = self
            .index
            .classes()
            .iter()
            .enumerate()
            .map(|(i, &class)| {
                let count = (0..n).filter(|&j| self.beat(street, i, j) > self.beat(street, j, i)).count();
                (class, count)
            })
            .collect();
        wins.sort_by(|a, b| b.1.cmp(&a.1));
        wins
    }

    /// Share of the deals between classes `i` and `j` that `i` won, in
    /// percent. `0` on the diagonal and `-1` when the two never met.
    pub fn win_percentage(&self, street: Street, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let won = self.beat(street, i, j) as f64;
        let lost = self.beat(street, j, i) as f64;
        if won + lost == 0.0 {
            return -1.0;
        }
        100.0 * won / (won + lost)
    }

    /// Showdowns won per appearance, in percent, or `-1` for a class that
    /// was never dealt.
    pub fn showdown_win_rate(&self, class: usize) -> f64 {
        match self.appearances(class) {
            0 => -1.0,
            seen => 100.0 * self.showdown_wins(class) as f64 / seen as f64,
        }
    }

    /// Winning hand types on `street` as shares of the configured
    /// iterations. A run that recorded fewer deals, or a merged one, will not
    /// sum to 100%.
    pub fn hand_type_distribution(&self, street: Street) -> HandTypeDistribution {
        let mut counts = [0u64; HandType::COUNT];
        let mut median = None;
        let half = self.iterations / 2;
        let mut seen = 0u64;
        for (code, &n) in self.hand_wins(street).into_iter().flatten() {
            counts[code.hand_type().ordinal() as usize] += n;
            seen += n;
            if median.is_none() && seen >= half {
                median = Some(*code);
            }
        }
        HandTypeDistribution { counts, iterations: self.iterations, median }
    }

    /// `HoleHandClass,WinCount` pairs, river head-to-head wins.
    pub fn write_win_rank<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let wins = self.head_to_head_wins(Street::River);
        write_striped(out, &wins, |out, (class, count)| write!(out, "{class},{count}"))
    }

    /// One block per class in win-rank order: the class on its own line, then
    /// its river win percentage against every class, lowest first.
    pub fn write_win_percentages<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let classes = self.index.classes();
        for (class, _) in self.head_to_head_wins(Street::River) {
            writeln!(out, "{class}")?;
            let i = self.index.index_of(&class);
            let mut row: Vec<(HoleHandClass, f64)> = classes
                .iter()
                .enumerate()
                .map(|(j, &other)| (other, self.win_percentage(Street::River, i, j)))
                .collect();
            row.sort_by(|a, b| a.1.total_cmp(&b.1));
            write_striped(out, &row, |out, (class, pct)| write!(out, "{class},{pct:.2}"))?;
        }
        Ok(())
    }

    /// `HoleHandClass,WinPercentage` at showdown, best first.
    pub fn write_showdown_win_rates<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut rates: Vec<(HoleHandClass, f64)> = self
            .index
            .classes()
            .iter()
            .enumerate()
            .map(|(i, &class)| (class, self.showdown_win_rate(i)))
            .collect();
        rates.sort_by(|a, b| b.1.total_cmp(&a.1));
        write_striped(out, &rates, |out, (class, pct)| write!(out, "{class},{pct:.2}"))
    }

    /// One `Players,pct...,Median` row, preceded by the header unless
    /// appending to an existing file.
    pub fn write_distribution<W: Write>(&self, street: Street, out: &mut W, header: bool) -> io::Result<()> {
        if header {
            write!(out, "Players")?;
            for t in HandType::ALL {
                write!(out, ",{}", t.label())?;
            }
            writeln!(out, ",Median")?;
        }
        let dist = self.hand_type_distribution(street);
        write!(out, "{}", self.players)?;
        for t in HandType::ALL {
            write!(out, ",{:.3}", dist.percentage(t))?;
        }
        writeln!(out, ",{}", dist.median_label())
    }

    /// Write every enabled report into `dir` and return the files written.
    ///
    /// Fails before touching the filesystem if the number of recorded deals
    /// differs from the configured iteration count.
    pub fn write_reports(&self, dir: &Path, append: bool) -> Result<Vec<PathBuf>, StatsError> {
        self.check_iterations()?;
        let mut written = Vec::new();
        if self.collects_hole_cards() {
            let showdown_file = format!("hole-cards-win-pct-{:02}-players.csv", self.players);
            self.write_file(dir.join(WIN_RANK_FILE), false, &mut written, |s, out| s.write_win_rank(out))?;
            self.write_file(dir.join(WIN_PCT_FILE), false, &mut written, |s, out| s.write_win_percentages(out))?;
            self.write_file(dir.join(showdown_file), false, &mut written, |s, out| s.write_showdown_win_rates(out))?;
        }
        if self.collects_winning_hand() {
            for street in Street::POSTFLOP {
                let path = dir.join(format!("winning-hand-distribution-{street}.csv"));
                self.write_file(path, append, &mut written, |s, out| s.write_distribution(street, out, !append))?;
            }
        }
        Ok(written)
    }

    fn write_file<F>(&self, path: PathBuf, append: bool, written: &mut Vec<PathBuf>, body: F) -> Result<(), StatsError>
    where
        F: FnOnce(&Self, &mut BufWriter<File>) -> io::Result<()>,
    {
        let result = (|| {
            let file = if append {
                OpenOptions::new().create(true).append(true).open(&path)?
            } else {
                File::create(&path)?
            };
            let mut out = BufWriter::new(file);
            body(self, &mut out)?;
            out.flush()
        })();
        result.map_err(|source| StatsError::Io { path: path.clone(), source })?;
        debug!("wrote {}", path.display());
        written.push(path);
        Ok(())
    }
}

/// Lay `items` out top to bottom, then left to right, over
/// [`REPORT_COLUMNS`] comma-separated columns. Short final columns are padded
/// with empty cells.
fn write_striped<W, T, F>(out: &mut W, items: &[T], mut cell: F) -> io::Result<()>
where
    W: Write,
    F: FnMut(&mut W, &T) -> io::Result<()>,
{
    let rows = items.len().div_ceil(REPORT_COLUMNS);
    for row in 0..rows {
        for col in 0..REPORT_COLUMNS {
            if col > 0 {
                write!(out, ",")?;
            }
            match items.get(row + col * rows) {
                Some(item) => cell(out, item)?,
                None => write!(out, ",")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::game::Table;
    use crate::hand::{Board, HoleCards};

    fn played(iterations: u64) -> Statistics {
        let config = SimulationConfig {
            players: 2,
            iterations,
            stats_hole_cards: true,
            stats_winning_hand: true,
            ..Default::default()
        };
        let mut stats = Statistics::new(&config);
        let holes: Vec<HoleCards> = ["As Ad", "Kc Qc"].iter().map(|h| h.parse().unwrap()).collect();
        let full: Board = "2h 7d 9s 3c 4h".parse().unwrap();
        let mut table = Table::with_cards(&holes, Board::new());
        stats.new_game(&table);
        for street in Street::ALL {
            while table.board().len() < street.board_len() {
                let card = full.as_slice()[table.board().len()];
                table.board_mut().push(card);
            }
            stats.collect(street, &table).unwrap();
        }
        stats
    }

    #[test]
    fn striped_layout_fills_columns_first() {
        let items: Vec<u32> = (0..12).collect();
        let mut out = Vec::new();
        write_striped(&mut out, &items, |out, n| write!(out, "n{n}")).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "n0,n2,n4,n6,n8,n10,,,,,,,,");
        assert_eq!(lines[1], "n1,n3,n5,n7,n9,n11,,,,,,,,");
    }

    #[test]
    fn sentinels_for_unseen_classes_and_pairs() {
        let stats = played(1);
        let aa = stats.index().index_of(&"AA".parse().unwrap());
        let kq = stats.index().index_of(&"KQs".parse().unwrap());
        let t9 = stats.index().index_of(&"T9o".parse().unwrap());
        assert_eq!(stats.win_percentage(Street::River, aa, aa), 0.0);
        assert_eq!(stats.win_percentage(Street::River, aa, kq), 100.0);
        assert_eq!(stats.win_percentage(Street::River, kq, aa), 0.0);
        assert_eq!(stats.win_percentage(Street::River, aa, t9), -1.0);
        assert_eq!(stats.showdown_win_rate(aa), 100.0);
        assert_eq!(stats.showdown_win_rate(kq), 0.0);
        assert_eq!(stats.showdown_win_rate(t9), -1.0);
    }

    #[test]
    fn head_to_head_puts_the_winner_first() {
        let stats = played(1);
        let wins = stats.head_to_head_wins(Street::River);
        assert_eq!(wins.len(), 169);
        assert_eq!(wins[0].0.to_string(), "AA");
        assert_eq!(wins[0].1, 1);
        assert!(wins[1..].iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn distribution_row_and_median() {
        let stats = played(1);
        let dist = stats.hand_type_distribution(Street::River);
        assert_eq!(dist.counts[HandType::Pair.ordinal() as usize], 1);
        assert_eq!(dist.percentage(HandType::Pair), 100.0);
        assert_eq!(dist.median_label(), "AA974");

        let mut out = Vec::new();
        stats.write_distribution(Street::River, &mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Players,High Card,One Pair,Two Pair,Three Of A Kind,Straight,Flush,Full House,Four Of A Kind,Straight Flush,Median")
        );
        assert_eq!(
            lines.next(),
            Some("2,0.000,100.000,0.000,0.000,0.000,0.000,0.000,0.000,0.000,AA974")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn distribution_is_over_configured_iterations() {
        // One deal recorded out of four configured.
        let stats = played(4);
        let dist = stats.hand_type_distribution(Street::River);
        assert_eq!(dist.iterations, 4);
        assert_eq!(dist.percentage(HandType::Pair), 25.0);
        assert_eq!(dist.median, None);
        assert_eq!(dist.median_label(), "");
    }

    #[test]
    fn median_label_marks_suited_types() {
        use crate::cards::Rank::*;
        let dist = HandTypeDistribution {
            counts: [0; HandType::COUNT],
            iterations: 0,
            median: Some(SortCode::encode(HandType::Flush, &[Ace, Jack, Eight, Four, Two])),
        };
        assert_eq!(dist.median_label(), "AJ842s");
    }

    #[test]
    fn mismatched_iterations_abort_before_writing() {
        let stats = played(5);
        let dir = std::env::temp_dir().join("holdem-sim-mismatch");
        let err = stats.write_reports(&dir, false).unwrap_err();
        assert!(matches!(err, StatsError::IterationMismatch { expected: 5, recorded: 1 }));
        assert!(!dir.join(WIN_RANK_FILE).exists());
    }

    #[test]
    fn reports_land_in_the_output_dir() {
        let stats = played(1);
        let dir = std::env::temp_dir().join(format!("holdem-sim-reports-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let written = stats.write_reports(&dir, false).unwrap();
        let names: Vec<String> =
            written.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();
        assert_eq!(
            names,
            [
                "hole-cards-win-rank.csv",
                "hole-cards-vs-other-hole-cards-win-pct.csv",
                "hole-cards-win-pct-02-players.csv",
                "winning-hand-distribution-flop.csv",
                "winning-hand-distribution-turn.csv",
                "winning-hand-distribution-river.csv",
            ]
        );
        // Appending adds a row without a second header.
        stats.write_reports(&dir, true).unwrap();
        let river = std::fs::read_to_string(dir.join("winning-hand-distribution-river.csv")).unwrap();
        assert_eq!(river.lines().count(), 3);
        assert_eq!(river.lines().filter(|l| l.starts_with("Players")).count(), 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
