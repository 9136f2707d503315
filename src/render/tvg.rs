//! Programme-guide identifiers for well-known channels.

use crate::domain::Channel;

/// Lowercase name fragment → EPG channel id, checked in order.
const KNOWN_TVG_IDS: &[(&str, &str)] = &[
    ("star plus", "StarPlus.in"),
    ("star gold", "StarGold.in"),
    ("star world", "StarWorld.in"),
    ("star sports 1", "StarSports1.in"),
    ("star sports 2", "StarSports2.in"),
    ("star sports 3", "StarSports3.in"),
    ("star sports first", "StarSportsFirst.in"),
    ("star maa", "StarMaa.in"),
    ("star vijay", "StarVijay.in"),
    ("star suvarna", "StarSuvarna.in"),
    ("zee tv", "ZeeTV.in"),
    ("zee cinema", "ZeeCinema.in"),
    ("zee news", "ZeeNews.in"),
    ("zee5", "Zee5.in"),
    ("zee café", "ZeeCafe.in"),
    ("zee bollywood", "ZeeBollywood.in"),
    ("zee anmol", "ZeeAnmol.in"),
    ("zee bangla", "ZeeBangla.in"),
    ("zee marathi", "ZeeMarathi.in"),
    ("zee kannada", "ZeeKannada.in"),
    ("zee telugu", "ZeeTelugu.in"),
    ("sony max", "SonyMax.in"),
    ("sony max 2", "SonyMax2.in"),
    ("sony six", "SonySix.in"),
    ("sony ten 1", "SonyTen1.in"),
    ("sony ten 2", "SonyTen2.in"),
    ("sony ten 3", "SonyTen3.in"),
    ("sony ten 4", "SonyTen4.in"),
    ("sony ten 5", "SonyTen5.in"),
    ("set india", "SonyEntertainmentTelevision.in"),
    ("sony sab", "SonySab.in"),
    ("sony aath", "SonyAath.in"),
    ("sony liv", "SonyLIV.in"),
    ("colors", "Colors.in"),
    ("colors cineplex", "ColorsCineplex.in"),
    ("colors infinity", "ColorsInfinity.in"),
    ("colors kannada", "ColorsKannada.in"),
    ("colors marathi", "ColorsMarathi.in"),
    ("colors bangla", "ColorsBangla.in"),
    ("colors gujarati", "ColorsGujarati.in"),
    ("ndtv 24x7", "NDTV24x7.in"),
    ("ndtv india", "NDTVIndia.in"),
    ("ndtv profit", "NDTVProfit.in"),
    ("aaj tak", "AajTak.in"),
    ("india today", "IndiaToday.in"),
    ("republic tv", "RepublicTV.in"),
    ("republic bharat", "RepublicBharat.in"),
    ("times now", "TimesNow.in"),
    ("mirror now", "MirrorNow.in"),
    ("cnbc tv18", "CNBCTV18.in"),
    ("cnbc awaaz", "CNBCAwaaz.in"),
    ("news18 india", "News18India.in"),
    ("wion", "WION.in"),
    ("dd national", "DDNational.in"),
    ("dd news", "DDNews.in"),
    ("dd india", "DDIndia.in"),
    ("dd sports", "DDSports.in"),
    ("sun tv", "SunTV.in"),
    ("kalaignar", "Kalaignar.in"),
    ("vijay tv", "VijayTV.in"),
    ("zee tamil", "ZeeTamil.in"),
    ("gemini tv", "GeminiTV.in"),
    ("maa tv", "MaaTV.in"),
    ("asianet", "Asianet.in"),
    ("surya tv", "SuryaTV.in"),
    ("mazhavil manorama", "MazhavilManorama.in"),
    ("flowers tv", "FlowersTV.in"),
    ("media one", "MediaOne.in"),
    ("star jalsha", "StarJalsha.in"),
    ("star pravah", "StarPravah.in"),
    ("discovery", "Discovery.in"),
    ("discovery science", "DiscoveryScience.in"),
    ("animal planet", "AnimalPlanet.in"),
    ("nat geo", "NatGeoWild.in"),
    ("national geographic", "NationalGeographic.in"),
    ("history tv18", "HistoryTV18.in"),
    ("tlc india", "TLC.in"),
    ("disney channel", "DisneyChannel.in"),
    ("disney junior", "DisneyJunior.in"),
    ("cartoon network", "CartoonNetwork.in"),
    ("nickelodeon", "Nickelodeon.in"),
    ("pogo", "Pogo.in"),
    ("mtv india", "MTV.in"),
    ("vh1 india", "VH1.in"),
    ("9xm", "9XM.in"),
    ("b4u movies", "B4UMovies.in"),
    ("b4u music", "B4UMusic.in"),
    ("aastha", "Aastha.in"),
    ("sanskar", "SanskarTV.in"),
];

/// Guide id for `channel`: the first known entry whose key is contained in
/// the name (or contains it), else the channel's own tvg-id.
pub fn epg_tvg_id(channel: &Channel) -> String {
    let name = channel.name.trim().to_lowercase();
    KNOWN_TVG_IDS
        .iter()
        .find(|(key, _)| name.contains(key) || key.contains(name.as_str()))
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| channel.tvg_id.clone())
}
