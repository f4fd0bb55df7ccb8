//! Writers for converted alignments.
//!
//! ## M4
//!
//! BLASR's `-m 4` format: one alignment per line, 13 space-separated columns.
//!
//! | Column | Description |
//! |--------|-------------|
//! | qName | Query (read) name |
//! | tName | Target (reference) name |
//! | score | Aligner score, lower is better |
//! | percentSimilarity | Matches over all alignment columns, as a percentage |
//! | qStrand | `0` forward, `1` reverse |
//! | qStart, qEnd | 0-based half-open query span, on the query strand |
//! | qLength | Full query length |
//! | tStrand | `0` forward, `1` reverse |
//! | tStart, tEnd | 0-based half-open target span |
//! | tLength | Full target length |
//! | mapQV | Mapping quality |

pub mod m4;
