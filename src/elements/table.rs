//! The embedded periodic-element table, keyed by two-letter WLN symbols.

/// TOML source for every `-XX-` element the notation can name.
pub(super) const ELEMENT_TABLE_TOML: &str = r#"
[[element]]
wln = "AC"
symbol = "Ac"
number = 89

[[element]]
wln = "AG"
symbol = "Ag"
number = 47

[[element]]
wln = "AL"
symbol = "Al"
number = 13

[[element]]
wln = "AM"
symbol = "Am"
number = 95

[[element]]
wln = "AR"
symbol = "Ar"
number = 18

[[element]]
wln = "AS"
symbol = "As"
number = 33

[[element]]
wln = "AT"
symbol = "At"
number = 85

[[element]]
wln = "AU"
symbol = "Au"
number = 79

[[element]]
wln = "BA"
symbol = "Ba"
number = 56

[[element]]
wln = "BE"
symbol = "Be"
number = 4

[[element]]
wln = "BH"
symbol = "Bh"
number = 107

[[element]]
wln = "BI"
symbol = "Bi"
number = 83

[[element]]
wln = "BK"
symbol = "Bk"
number = 97

[[element]]
wln = "BR"
symbol = "Br"
number = 35

[[element]]
wln = "CA"
symbol = "Ca"
number = 20

[[element]]
wln = "CD"
symbol = "Cd"
number = 48

[[element]]
wln = "CE"
symbol = "Ce"
number = 58

[[element]]
wln = "CF"
symbol = "Cf"
number = 98

[[element]]
wln = "CM"
symbol = "Cm"
number = 96

[[element]]
wln = "CN"
symbol = "Cn"
number = 112

[[element]]
wln = "CO"
symbol = "Co"
number = 27

[[element]]
wln = "CR"
symbol = "Cr"
number = 24

[[element]]
wln = "CS"
symbol = "Cs"
number = 55

[[element]]
wln = "CU"
symbol = "Cu"
number = 29

[[element]]
wln = "DB"
symbol = "Db"
number = 105

[[element]]
wln = "DS"
symbol = "Ds"
number = 110

[[element]]
wln = "DY"
symbol = "Dy"
number = 66

[[element]]
wln = "ER"
symbol = "Er"
number = 68

[[element]]
wln = "ES"
symbol = "Es"
number = 99

[[element]]
wln = "EU"
symbol = "Eu"
number = 63

[[element]]
wln = "FE"
symbol = "Fe"
number = 26

[[element]]
wln = "FL"
symbol = "Fl"
number = 114

[[element]]
wln = "FM"
symbol = "Fm"
number = 100

[[element]]
wln = "FR"
symbol = "Fr"
number = 87

[[element]]
wln = "GA"
symbol = "Ga"
number = 31

[[element]]
wln = "GD"
symbol = "Gd"
number = 64

[[element]]
wln = "GE"
symbol = "Ge"
number = 32

[[element]]
wln = "HE"
symbol = "He"
number = 2

[[element]]
wln = "HF"
symbol = "Hf"
number = 72

[[element]]
wln = "HG"
symbol = "Hg"
number = 80

[[element]]
wln = "HO"
symbol = "Ho"
number = 67

[[element]]
wln = "HS"
symbol = "Hs"
number = 108

[[element]]
wln = "IN"
symbol = "In"
number = 49

[[element]]
wln = "IR"
symbol = "Ir"
number = 77

[[element]]
wln = "KA"
symbol = "K"
number = 19

[[element]]
wln = "KR"
symbol = "Kr"
number = 36

[[element]]
wln = "LA"
symbol = "La"
number = 57

[[element]]
wln = "LI"
symbol = "Li"
number = 3

[[element]]
wln = "LR"
symbol = "Lr"
number = 103

[[element]]
wln = "LU"
symbol = "Lu"
number = 71

[[element]]
wln = "LV"
symbol = "Lv"
number = 116

[[element]]
wln = "MC"
symbol = "Mc"
number = 115

[[element]]
wln = "MD"
symbol = "Md"
number = 101

[[element]]
wln = "MG"
symbol = "Mg"
number = 12

[[element]]
wln = "MN"
symbol = "Mn"
number = 25

[[element]]
wln = "MO"
symbol = "Mo"
number = 42

[[element]]
wln = "MT"
symbol = "Mt"
number = 109

[[element]]
wln = "NA"
symbol = "Na"
number = 11

[[element]]
wln = "NB"
symbol = "Nb"
number = 41

[[element]]
wln = "ND"
symbol = "Nd"
number = 60

[[element]]
wln = "NE"
symbol = "Ne"
number = 10

[[element]]
wln = "NH"
symbol = "Nh"
number = 113

[[element]]
wln = "NI"
symbol = "Ni"
number = 28

[[element]]
wln = "NO"
symbol = "No"
number = 102

[[element]]
wln = "NP"
symbol = "Np"
number = 93

[[element]]
wln = "OG"
symbol = "Og"
number = 118

[[element]]
wln = "OS"
symbol = "Os"
number = 76

[[element]]
wln = "PA"
symbol = "Pa"
number = 91

[[element]]
wln = "PB"
symbol = "Pb"
number = 82

[[element]]
wln = "PD"
symbol = "Pd"
number = 46

[[element]]
wln = "PM"
symbol = "Pm"
number = 61

[[element]]
wln = "PO"
symbol = "Po"
number = 84

[[element]]
wln = "PR"
symbol = "Pr"
number = 59

[[element]]
wln = "PT"
symbol = "Pt"
number = 78

[[element]]
wln = "PU"
symbol = "Pu"
number = 94

[[element]]
wln = "RA"
symbol = "Ra"
number = 88

[[element]]
wln = "RB"
symbol = "Rb"
number = 37

[[element]]
wln = "RE"
symbol = "Re"
number = 75

[[element]]
wln = "RF"
symbol = "Rf"
number = 104

[[element]]
wln = "RG"
symbol = "Rg"
number = 111

[[element]]
wln = "RH"
symbol = "Rh"
number = 45

[[element]]
wln = "RN"
symbol = "Rn"
number = 86

[[element]]
wln = "RU"
symbol = "Ru"
number = 44

[[element]]
wln = "SB"
symbol = "Sb"
number = 51

[[element]]
wln = "SC"
symbol = "Sc"
number = 21

[[element]]
wln = "SE"
symbol = "Se"
number = 34

[[element]]
wln = "SG"
symbol = "Sg"
number = 106

[[element]]
wln = "SI"
symbol = "Si"
number = 14

[[element]]
wln = "SM"
symbol = "Sm"
number = 62

[[element]]
wln = "SN"
symbol = "Sn"
number = 50

[[element]]
wln = "SR"
symbol = "Sr"
number = 38

[[element]]
wln = "TA"
symbol = "Ta"
number = 73

[[element]]
wln = "TB"
symbol = "Tb"
number = 65

[[element]]
wln = "TC"
symbol = "Tc"
number = 43

[[element]]
wln = "TE"
symbol = "Te"
number = 52

[[element]]
wln = "TH"
symbol = "Th"
number = 90

[[element]]
wln = "TI"
symbol = "Ti"
number = 22

[[element]]
wln = "TL"
symbol = "Tl"
number = 81

[[element]]
wln = "TM"
symbol = "Tm"
number = 69

[[element]]
wln = "TS"
symbol = "Ts"
number = 117

[[element]]
wln = "UR"
symbol = "U"
number = 92

[[element]]
wln = "VA"
symbol = "V"
number = 23

[[element]]
wln = "WT"
symbol = "W"
number = 74

[[element]]
wln = "XE"
symbol = "Xe"
number = 54

[[element]]
wln = "YB"
symbol = "Yb"
number = 70

[[element]]
wln = "YT"
symbol = "Y"
number = 39

[[element]]
wln = "ZN"
symbol = "Zn"
number = 30

[[element]]
wln = "ZR"
symbol = "Zr"
number = 40
"#;
