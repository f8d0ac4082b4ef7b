pub const HEALTHWISE_LOGO: &[&str] = &[
    r" _  _         _ _   _        _",
    r"| || |___ __ _| | |_| |_ __ __(_)___ ___",
    r"| __ / -_) _` | |  _| ' \\ V  V / (_-</ -_)",
    r"|_||_\___\__,_|_|\__|_||_\_/\_/|_/__/\___|",
];
