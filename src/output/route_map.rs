//! Router configuration for RPKI origin validation.
//!
//! The output tags announcements with one of three communities:
//! not-found when no ROA covers the prefix, valid when the prefix and the
//! origin AS match a ROA. Everything else covered by a ROA is invalid and
//! rejected by the final deny.

use crate::config::{
    COMMUNITY_ASN, COMMUNITY_INVALID, COMMUNITY_NOT_FOUND, COMMUNITY_VALID,
    COVERED_SPACE_PREFIX_LIST, ORIGIN_PREFIX_LIST, ROUTE_MAP,
};
use crate::processing::RpkiOv;
use std::io::{self, Write};

/// First route-map sequence number used for valid origins.
const FIRST_ORIGIN_SEQ: usize = 3;

/// Print the configuration to stdout.
pub fn print_route_map(rpki_ov: &RpkiOv) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_route_map(&mut out, rpki_ov)?;
    out.flush()
}

/// Write the complete configuration: community lists, covered space,
/// per-origin filters and the route-map.
pub fn write_route_map<W: Write>(out: &mut W, rpki_ov: &RpkiOv) -> io::Result<()> {
    write_community_lists(out)?;
    write_covered_space(out, rpki_ov)?;
    write_origin_filters(out, rpki_ov)?;
    write_rpki_ov(out, rpki_ov)
}

fn write_community_lists<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "!")?;
    writeln!(out, "ip bgp-community new-format")?;
    for (name, value) in [
        ("rpki-not-found", COMMUNITY_NOT_FOUND),
        ("rpki-valid", COMMUNITY_VALID),
        ("rpki-invalid", COMMUNITY_INVALID),
    ] {
        writeln!(out, "no ip community-list {name}")?;
        writeln!(
            out,
            "ip community-list standard {name} permit {COMMUNITY_ASN}:{value}"
        )?;
    }
    writeln!(out, "no ip community-list rpki")?;
    writeln!(
        out,
        "ip community-list expanded rpki permit {COMMUNITY_ASN}:[{COMMUNITY_NOT_FOUND}{COMMUNITY_VALID}{COMMUNITY_INVALID}]"
    )?;
    writeln!(out, "!")
}

fn write_covered_space<W: Write>(out: &mut W, rpki_ov: &RpkiOv) -> io::Result<()> {
    writeln!(out, "no ip prefix-list {COVERED_SPACE_PREFIX_LIST}")?;
    for block in &rpki_ov.covered_space {
        writeln!(
            out,
            "ip prefix-list {COVERED_SPACE_PREFIX_LIST} permit {block} le 32"
        )?;
    }
    writeln!(out, "!")
}

fn write_origin_filters<W: Write>(out: &mut W, rpki_ov: &RpkiOv) -> io::Result<()> {
    for origin in rpki_ov.origins.routable() {
        let asn = origin.asn;
        writeln!(out, "!")?;
        writeln!(out, "no ip prefix-list {ORIGIN_PREFIX_LIST}{asn}")?;
        for clause in &origin.clauses {
            writeln!(out, "ip prefix-list {ORIGIN_PREFIX_LIST}{asn} permit {clause}")?;
        }
        writeln!(out, "!")?;
        writeln!(out, "no ip as-path access-list {asn}")?;
        writeln!(out, "ip as-path access-list {asn} permit _{asn}$")?;
    }
    Ok(())
}

fn write_rpki_ov<W: Write>(out: &mut W, rpki_ov: &RpkiOv) -> io::Result<()> {
    writeln!(out, "!")?;
    writeln!(out, "! test whether BGP NLRI is covered by RPKI ROA or not")?;
    writeln!(out, "route-map {ROUTE_MAP} permit 1")?;
    writeln!(
        out,
        " match ip address prefix-list {COVERED_SPACE_PREFIX_LIST}"
    )?;
    writeln!(out, " set comm-list rpki delete")?;
    writeln!(out, " continue {FIRST_ORIGIN_SEQ}")?;
    writeln!(out, "!")?;
    writeln!(
        out,
        "! BGP announcement is not covered by RPKI ROA, mark as not-found and exit"
    )?;
    writeln!(out, "route-map {ROUTE_MAP} permit 2")?;
    writeln!(out, " set comm-list rpki delete")?;
    writeln!(
        out,
        " set community {COMMUNITY_ASN}:{COMMUNITY_NOT_FOUND} additive"
    )?;
    writeln!(out, "!")?;
    writeln!(out, "! find RPKI valids")?;

    let mut seq = FIRST_ORIGIN_SEQ;
    for origin in rpki_ov.origins.routable() {
        let asn = origin.asn;
        writeln!(out, "!")?;
        writeln!(out, "route-map {ROUTE_MAP} permit {seq}")?;
        writeln!(out, " match ip prefix-list {ORIGIN_PREFIX_LIST}{asn}")?;
        writeln!(out, " match as-path {asn}")?;
        writeln!(out, " set community {COMMUNITY_ASN}:{COMMUNITY_VALID}")?;
        seq += 1;
    }

    writeln!(out, "!")?;
    writeln!(out, "! Reject RPKI Invalid BGP announcements")?;
    writeln!(out, "route-map {ROUTE_MAP} deny {seq}")
}
