
use harness::cases::acyclic::*;
use harness::cases::ionic::*;
use harness::cases::rings::*;
use harness::run_molecule_test_case;

macro_rules! generate_molecule_test {
    ($test_name:ident, $molecule_case:expr) => {
        #[test]
        fn $test_name() {
            run_molecule_test_case(&$molecule_case);
        }
    };
}

generate_molecule_test!(ethane, ETHANE);
generate_molecule_test!(ethene, ETHENE);
generate_molecule_test!(ethyne, ETHYNE);
generate_molecule_test!(methanol, METHANOL);
generate_molecule_test!(isopropanol, ISOPROPANOL);
generate_molecule_test!(ethyl_ester, ETHYL_ESTER);
generate_molecule_test!(nitromethane, NITROMETHANE);
generate_molecule_test!(methylamine, METHYLAMINE);
generate_molecule_test!(ammonia, AMMONIA);
generate_molecule_test!(chloromethane, CHLOROMETHANE);
generate_molecule_test!(methyl_tin, METHYL_TIN);
generate_molecule_test!(acetonitrile, ACETONITRILE);
generate_molecule_test!(acetic_acid, ACETIC_ACID);
generate_molecule_test!(neopentane, NEOPENTANE);
generate_molecule_test!(isobutane, ISOBUTANE);

generate_molecule_test!(benzene, BENZENE);
generate_molecule_test!(toluene, TOLUENE);
generate_molecule_test!(toluene_contraction, TOLUENE_CONTRACTION);
generate_molecule_test!(xylene, XYLENE);
generate_molecule_test!(pyridine, PYRIDINE);
generate_molecule_test!(piperidine, PIPERIDINE);
generate_molecule_test!(pyrrole, PYRROLE);
generate_molecule_test!(furan, FURAN);
generate_molecule_test!(naphthalene, NAPHTHALENE);
generate_molecule_test!(fused_pyrrole, FUSED_PYRROLE);
generate_molecule_test!(cyclohexene, CYCLOHEXENE);
generate_molecule_test!(nh_substituted_ring, NH_SUBSTITUTED_RING);
generate_molecule_test!(spiro_nonane, SPIRO_NONANE);
generate_molecule_test!(norbornane, NORBORNANE);
generate_molecule_test!(stannacyclopentane, STANNACYCLOPENTANE);

generate_molecule_test!(alcohol_fragments, ALCOHOL_FRAGMENTS);
generate_molecule_test!(methylammonium_chloride, METHYLAMMONIUM_CHLORIDE);
generate_molecule_test!(pyridinium, PYRIDINIUM);
generate_molecule_test!(cyclopentadienide, CYCLOPENTADIENIDE);
